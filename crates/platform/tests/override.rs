//! Capability override behavior.
//!
//! Runs in its own binary because the override is process-global state.

use platform::{caps, caps::x86, has_override, set_caps_override};

#[test]
fn override_takes_precedence_and_clears() {
  assert!(!has_override());

  let synthetic = x86::SSE2 | x86::SSSE3;
  set_caps_override(Some(synthetic));
  assert!(has_override());
  assert_eq!(caps(), synthetic);

  // Idempotent while set.
  assert_eq!(caps(), synthetic);

  set_caps_override(None);
  assert!(!has_override());

  // Detection resumes; whatever it reports must at least be stable.
  assert_eq!(caps(), caps());
}
