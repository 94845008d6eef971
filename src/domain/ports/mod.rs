mod connection_port;

pub use connection_port::ConnectionPort;
