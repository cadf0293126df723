pub mod message;
pub mod pdu;
