use payloads::{Auction, ListingId, Property, Vehicle};
use yew::prelude::*;

use super::{FetchHookReturn, use_fetch};
use crate::get_api_client;

#[hook]
pub fn use_properties() -> FetchHookReturn<Vec<Property>> {
    use_fetch((), || async {
        get_api_client()
            .list_properties()
            .await
            .map_err(|e| e.user_message("Error al cargar las propiedades"))
    })
}

#[hook]
pub fn use_property(id: ListingId) -> FetchHookReturn<Property> {
    use_fetch(id.clone(), move || {
        let id = id.clone();
        async move {
            get_api_client()
                .get_property(&id)
                .await
                .map_err(|e| e.user_message("Error al cargar la propiedad"))
        }
    })
}

#[hook]
pub fn use_auctions() -> FetchHookReturn<Vec<Auction>> {
    use_fetch((), || async {
        get_api_client()
            .list_auctions()
            .await
            .map_err(|e| e.user_message("Error al cargar las subastas"))
    })
}

#[hook]
pub fn use_auction(id: ListingId) -> FetchHookReturn<Auction> {
    use_fetch(id.clone(), move || {
        let id = id.clone();
        async move {
            get_api_client()
                .get_auction(&id)
                .await
                .map_err(|e| e.user_message("Error al cargar la subasta"))
        }
    })
}

#[hook]
pub fn use_vehicles() -> FetchHookReturn<Vec<Vehicle>> {
    use_fetch((), || async {
        get_api_client()
            .list_vehicles()
            .await
            .map_err(|e| e.user_message("Error al cargar los vehículos"))
    })
}

#[hook]
pub fn use_vehicle(id: ListingId) -> FetchHookReturn<Vehicle> {
    use_fetch(id.clone(), move || {
        let id = id.clone();
        async move {
            get_api_client()
                .get_vehicle(&id)
                .await
                .map_err(|e| e.user_message("Error al cargar el vehículo"))
        }
    })
}
