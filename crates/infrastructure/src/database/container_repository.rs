use async_trait::async_trait;
use domain::{Container, ContainerRepository, DomainError};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use super::entities::containers;
use super::weighing_store::store_error;

/// Container registry backed by `containers_registered`
#[derive(Clone)]
pub struct SeaOrmContainerRepository {
    db: DatabaseConnection,
}

impl SeaOrmContainerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts or replaces a registry row
    pub async fn upsert(&self, container: &Container) -> Result<(), DomainError> {
        let active_model = containers::ActiveModel {
            container_id: Set(container.id.clone()),
            weight: Set(container.weight),
            unit: Set(container.unit.clone()),
        };

        containers::Entity::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(containers::Column::ContainerId)
                    .update_columns([containers::Column::Weight, containers::Column::Unit])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

#[async_trait]
impl ContainerRepository for SeaOrmContainerRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Container>, DomainError> {
        let model = containers::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(store_error)?;
        Ok(model.map(model_to_container))
    }

    async fn find_many(&self, ids: &[String]) -> Result<Vec<Container>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = containers::Entity::find()
            .filter(containers::Column::ContainerId.is_in(ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(store_error)?;
        Ok(models.into_iter().map(model_to_container).collect())
    }

    async fn find_all(&self) -> Result<Vec<Container>, DomainError> {
        let models = containers::Entity::find()
            .order_by_asc(containers::Column::ContainerId)
            .all(&self.db)
            .await
            .map_err(store_error)?;
        Ok(models.into_iter().map(model_to_container).collect())
    }
}

pub(crate) fn model_to_container(model: containers::Model) -> Container {
    Container::new(model.container_id, model.weight, model.unit)
}
