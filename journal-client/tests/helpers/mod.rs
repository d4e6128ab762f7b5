pub mod gateway_stub;
