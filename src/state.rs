use crate::services::pipeline::Pipeline;

pub struct AppState {
    pub pipeline: Pipeline,
}
