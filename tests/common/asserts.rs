#![allow(dead_code)]

use cors_manager::{CorsDecision, Headers};

pub fn assert_pass_through(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::PassThrough { headers } => headers,
        other => panic!("expected pass-through decision, got {:?}", other),
    }
}

pub fn assert_terminated(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::Terminated { headers } => headers,
        other => panic!("expected terminated decision, got {:?}", other),
    }
}
