pub mod devops;
pub mod keyvault;

pub use devops::{AzureDevOpsClient, RemoteCredentials, WorkItemApi};
pub use keyvault::fetch_secret;
