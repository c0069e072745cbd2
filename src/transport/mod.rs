//! Stream transports
//!
//! - `grpc` - tonic server for `freeclimb.GRPCStreamService/SendIVRData`

pub mod grpc;

pub use grpc::{
    AppMessageStream, DEFAULT_CHANNEL_CAPACITY, GrpcTransport, IvrStreamServer, IvrStreamService,
};
