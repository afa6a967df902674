mod client;
mod request;
mod response;

#[cfg(test)]
pub(crate) mod test_server;

pub(crate) use client::{build_client, fetch};
pub use request::{Method, RequestDescriptor, RequestDescriptorBuilder, RequestId};
pub use response::ResponseResult;
