mod command;
mod query;

use self::command::ProductCommandService;
use self::query::ProductQueryService;

use crate::{
    abstract_trait::{
        DynCacheStore, DynProductCommandRepository, DynProductCommandService,
        DynProductQueryRepository, DynProductQueryService,
    },
    utils::ServiceTracer,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct ProductService {
    pub query: DynProductQueryService,
    pub command: DynProductCommandService,
}

impl ProductService {
    pub async fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        cache: DynCacheStore,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let query_tracer = ServiceTracer::new("product_query_service", registry.clone()).await;
        let command_tracer = ServiceTracer::new("product_command_service", registry).await;

        let query = Arc::new(ProductQueryService::new(query, query_tracer)) as DynProductQueryService;
        let command = Arc::new(ProductCommandService::new(command, cache, command_tracer))
            as DynProductCommandService;

        Self { query, command }
    }
}
