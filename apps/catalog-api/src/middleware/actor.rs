//! Actor identity extractor.
//!
//! Authentication happens at the edge in front of this service; the edge
//! forwards the authenticated user id in `X-Actor-Id`.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

use cinegate_core::domain::ActorId;

/// Header carrying the authenticated user id.
pub static ACTOR_ID_HEADER: &str = "X-Actor-Id";

/// Optional actor extractor - never rejects a request.
///
/// A missing or malformed header yields `None`; the read proceeds without a
/// view notification.
#[derive(Debug, Clone, Copy)]
pub struct OptionalActor(pub Option<ActorId>);

impl FromRequest for OptionalActor {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(value) = req.headers().get(ACTOR_ID_HEADER) else {
            return ready(Ok(OptionalActor(None)));
        };

        let actor = value.to_str().ok().and_then(|s| s.trim().parse().ok());
        if actor.is_none() {
            tracing::debug!(header = ACTOR_ID_HEADER, "Ignoring malformed actor id");
        }

        ready(Ok(OptionalActor(actor)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn extract(req: TestRequest) -> Option<ActorId> {
        let (req, mut payload) = req.to_http_parts();
        OptionalActor::from_request(&req, &mut payload)
            .into_inner()
            .unwrap()
            .0
    }

    #[test]
    fn test_reads_actor_header() {
        let req = TestRequest::default().insert_header((ACTOR_ID_HEADER, "42"));
        assert_eq!(extract(req), Some(42));
    }

    #[test]
    fn test_missing_or_malformed_header_is_none() {
        assert_eq!(extract(TestRequest::default()), None);
        let req = TestRequest::default().insert_header((ACTOR_ID_HEADER, "not-a-number"));
        assert_eq!(extract(req), None);
    }
}
