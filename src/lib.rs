pub mod dao;
pub mod gateway;
pub mod keys;
pub mod logger;
pub mod view;
pub mod web;
