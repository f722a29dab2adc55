// ==========================================
// Medication Shortage CDS Service - CDS hook layer
// ==========================================
// payload: hook request assembly (pure)
// client: outbound dispatch (reqwest, bounded timeout, no retry)
// ==========================================

pub mod client;
pub mod payload;

pub use client::{
    CdsHookClient, HookDispatchOutcome, HookDispatcher, HookTransportError, DEFAULT_HOOK_TIMEOUT,
};
pub use payload::{
    build_order_sign_request, CdsHookRequest, ATC_CODING_SYSTEM, AUTHOR_REFERENCE,
    HOOK_ORDER_SIGN, SUBJECT_REFERENCE,
};
