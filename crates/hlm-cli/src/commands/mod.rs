pub mod attendance;
pub mod audit;
pub mod auth;
pub mod client;
pub mod dashboard;
pub mod dispatch;
pub mod finance;
pub mod nav;
pub mod notification;
pub mod project;
pub mod service;
pub mod shared;
pub mod task;
pub mod team;
