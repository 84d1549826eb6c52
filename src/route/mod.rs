use crate::config::Config;
use crate::service::database::DatabaseService;

pub mod channel;
pub mod source;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub database: DatabaseService,
}
