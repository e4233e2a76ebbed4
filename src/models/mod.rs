pub mod entities;
pub mod intent;
pub mod request;
pub mod response;

pub use entities::{EntityBag, FieldResult, LeadSource, LeadStatus};
pub use intent::{BusinessIntent, IntentLabel, SignalDistribution};
pub use request::{BotRequest, RequestMetadata};
pub use response::{
    BotResponse, CrmCall, ErrorBody, ErrorEnvelope, ErrorKind, ResponsePayload, ResultMessage,
    ValidationDetails, ValidationErrorBody, ValidationFailure,
};
