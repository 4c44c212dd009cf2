pub mod awesome_api;
pub mod util;

pub use awesome_api::AwesomeApiProvider;
pub use util::RetryPolicy;
