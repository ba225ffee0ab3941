//! 路径参数安全提取器
//!
//! 非法 ID 在进入处理函数前就被拦下，返回统一错误包络。

use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse, error::InternalError};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_path_i64(req: &HttpRequest, name: &str) -> Result<i64, Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    raw.parse::<i64>().map_err(|_| {
        let message = format!("Invalid path parameter '{name}': '{raw}' is not a valid ID");
        InternalError::from_response(
            message.clone(),
            HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
        )
        .into()
    })
}

/// `{id}` 路径段的 i64 提取器
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse_path_i64(req, "id").map(SafeIDI64))
    }
}
