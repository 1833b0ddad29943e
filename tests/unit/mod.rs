mod builtins;
mod checking;
mod common;
mod control_flow;
mod dispatch;
mod pipeline;
