use std::sync::Mutex;

use routemark::DefaultContext;
use routemark::axum::http::StatusCode;

use crate::models;

#[derive(Default)]
pub struct PetStore {
    pets: Mutex<Vec<models::Pet>>,
}

impl PetStore {
    /// Lists pets, optionally of one species.
    ///
    /// @RequestMapping{"method":"GET","path":"/pets"}
    pub fn list(
        &self,
        req: &models::PetQuery,
        _ctx: &DefaultContext,
    ) -> Result<Vec<models::Pet>, routemark::Error> {
        let pets = self.pets.lock().map_err(|_| routemark::Error::msg("pet store poisoned"))?;
        Ok(pets
            .iter()
            .filter(|pet| req.species.as_ref().is_none_or(|species| &pet.species == species))
            .cloned()
            .collect())
    }

    /// @RequestMapping{"method":"POST","path":"/pets"}
    pub async fn create(
        &self,
        req: &models::Pet,
        _ctx: &DefaultContext,
    ) -> Result<models::Pet, routemark::Error> {
        if req.name.is_empty() {
            return Err(routemark::Error::new(StatusCode::UNPROCESSABLE_ENTITY, "pet needs a name"));
        }
        let mut pets = self.pets.lock().map_err(|_| routemark::Error::msg("pet store poisoned"))?;
        pets.push(req.clone());
        Ok(req.clone())
    }
}
