// Vaani Engine — Command resolution pipeline
// Tiered dispatch over an offline intent catalog, persisted conversation
// memory, entity dictionaries, and a remote inference gateway.

pub mod dispatcher;
pub mod gateway;
pub mod intent;
pub mod language;
pub mod resolver;
pub mod store;
