//! SeaORM entity models

mod dataset;

pub use dataset::{
    Entity as DatasetEntity,
    Model as Dataset,
    ActiveModel as DatasetActiveModel,
    Column as DatasetColumn,
    NewDataset,
};
