pub mod api_response;
pub mod app_error;
pub mod jwt_utils;
pub mod validated_wrapper;
pub mod validator_utils;
