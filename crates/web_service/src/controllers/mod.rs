pub mod branch_controller;
pub mod conversation_controller;
