mod command;
mod query;

pub use self::command::OrderCommandServiceDeps;

use self::command::OrderCommandService;
use self::query::OrderQueryService;

use crate::{
    abstract_trait::{DynOrderCommandService, DynOrderQueryRepository, DynOrderQueryService},
    config::BankConfig,
    utils::ServiceTracer,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct OrderService {
    pub query: DynOrderQueryService,
    pub command: DynOrderCommandService,
}

impl OrderService {
    pub async fn new(
        query_repository: DynOrderQueryRepository,
        bank: BankConfig,
        command_deps: OrderCommandServiceDeps,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let query_tracer = ServiceTracer::new("order_query_service", registry.clone()).await;
        let command_tracer = ServiceTracer::new("order_command_service", registry).await;

        let query = Arc::new(OrderQueryService::new(query_repository, bank, query_tracer))
            as DynOrderQueryService;
        let command = Arc::new(OrderCommandService::new(command_deps, command_tracer))
            as DynOrderCommandService;

        Self { query, command }
    }
}
