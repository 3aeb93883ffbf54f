// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Group extension traits for third-party types used by the source adapters under one `ext` namespace
// role: module/aggregation
// outputs: Re-exported submodules providing utility traits (JsonFetch over raw payloads)
// invariants: No side effects; pure extensions only
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

// Extension traits live under `crate::ext`, one submodule per extended crate.

pub mod serde_json;
