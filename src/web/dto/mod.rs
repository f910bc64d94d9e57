pub mod api_key_dto;
