mod api_key;

pub use api_key::{
    ApiKeyRow,
    create_api_key,
    get_api_key_by_id,
    list_api_keys,
    update_api_key_name,
    update_api_key_name_and_type,
    delete_api_key,
};
