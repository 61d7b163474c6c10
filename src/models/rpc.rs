use std::fmt;

/// Categorias de status das chamadas RPC (códigos numéricos do gRPC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcStatus {
    Ok,
    InvalidArgument,
    NotFound,
    Internal,
}

impl RpcStatus {
    pub fn code(self) -> u16 {
        match self {
            RpcStatus::Ok => 0,
            RpcStatus::InvalidArgument => 3,
            RpcStatus::NotFound => 5,
            RpcStatus::Internal => 13,
        }
    }

    pub fn http_status(self) -> u16 {
        match self {
            RpcStatus::Ok => 200,
            RpcStatus::InvalidArgument => 400,
            RpcStatus::NotFound => 404,
            RpcStatus::Internal => 500,
        }
    }

    pub fn is_ok(self) -> bool {
        self == RpcStatus::Ok
    }
}

impl fmt::Display for RpcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RpcStatus::Ok => "OK",
            RpcStatus::InvalidArgument => "INVALID_ARGUMENT",
            RpcStatus::NotFound => "NOT_FOUND",
            RpcStatus::Internal => "INTERNAL",
        };
        f.write_str(name)
    }
}

/// Resultado de uma operação: o payload é sempre bem formado,
/// mesmo quando o status indica falha.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcReply<T> {
    pub status: RpcStatus,
    pub details: Option<String>,
    pub payload: T,
}

impl<T> RpcReply<T> {
    pub fn ok(payload: T) -> Self {
        RpcReply { status: RpcStatus::Ok, details: None, payload }
    }

    pub fn with_status(status: RpcStatus, details: impl Into<String>, payload: T) -> Self {
        RpcReply { status, details: Some(details.into()), payload }
    }
}
