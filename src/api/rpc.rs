use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

use crate::{api::metrics, models::RpcReply};

pub const GRPC_STATUS: &str = "grpc-status";
pub const GRPC_MESSAGE: &str = "grpc-message";

/// Codifica o RpcReply: payload sempre no corpo, status no HTTP e nos
/// headers `grpc-status` / `grpc-message` (percent-encoded).
pub fn respond<T: Serialize>(operation: &str, reply: RpcReply<T>) -> HttpResponse {
    metrics::increment_call_count();

    let http_status = StatusCode::from_u16(reply.status.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut builder = HttpResponse::build(http_status);
    builder.insert_header((GRPC_STATUS, reply.status.code().to_string()));

    if !reply.status.is_ok() {
        metrics::increment_error_count();
        log::warn!(
            "⚠️ {} -> {} ({})",
            operation,
            reply.status,
            reply.details.as_deref().unwrap_or("")
        );
    }

    if let Some(details) = &reply.details {
        builder.insert_header((GRPC_MESSAGE, urlencoding::encode(details).into_owned()));
    }

    builder.json(reply.payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CrudResponse, RpcStatus};

    #[test]
    fn test_ok_reply_has_no_message_header() {
        let res = respond("CrearUsuario", RpcReply::ok(CrudResponse::ok("done")));

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get(GRPC_STATUS).unwrap(), "0");
        assert!(res.headers().get(GRPC_MESSAGE).is_none());
    }

    #[test]
    fn test_error_reply_encodes_details() {
        let reply = RpcReply::with_status(
            RpcStatus::InvalidArgument,
            "ID inválido",
            CrudResponse::failed("x"),
        );

        let res = respond("LeerUsuarioPorId", reply);

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(res.headers().get(GRPC_STATUS).unwrap(), "3");
        assert_eq!(res.headers().get(GRPC_MESSAGE).unwrap(), "ID%20inv%C3%A1lido");
    }
}
