use crate::config::HardwareId;
use tracing::{event, Level};

/// Outcome of matching a device against the affected-device list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
  /// The device matched an entry; the filter stays attached and denies opens.
  Affected,

  /// No entry matched; the filter detaches and leaves the device alone.
  NotAffected,
}

impl Verdict {
  #[inline]
  pub fn is_affected(self) -> bool {
    matches!(self, Verdict::Affected)
  }
}

/// Checks whether a device should get intercepted.
///
/// Walks the configured list in order and stops at the first entry that
/// equals the device's hardware identifier, ignoring case. An exhausted list
/// (including the empty one) means the device is not affected. The verdict
/// depends only on membership, never on where in the list the entry sits.
pub fn evaluate(hardware_id: HardwareId, affected: &[HardwareId]) -> Verdict {
  for entry in affected {
    event!(
      target: "device-gatekeeper",
      Level::TRACE,
      device.hardware_id = %hardware_id,
      list.entry = %entry,
      "comparing hardware identifiers"
    );

    if entry.matches(&hardware_id) {
      event!(
        target: "device-gatekeeper",
        Level::DEBUG,
        device.hardware_id = %hardware_id,
        "hardware identifier found in affected device list"
      );
      return Verdict::Affected;
    }
  }

  Verdict::NotAffected
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Config;

  fn affected(entries: &[&'static str]) -> Config {
    Config::from_affected(entries.iter().copied())
  }

  #[test]
  fn matching_entry_yields_affected() {
    let config = affected(&["VID_1234&PID_0001"]);
    let id = HardwareId::new("VID_1234&PID_0001");

    assert_eq!(evaluate(id, config.affected_devices()), Verdict::Affected);
  }

  #[test]
  fn absent_entry_yields_not_affected() {
    let config = affected(&["VID_1234&PID_0001"]);
    let id = HardwareId::new("VID_5678&PID_0002");

    assert_eq!(evaluate(id, config.affected_devices()), Verdict::NotAffected);
  }

  #[test]
  fn comparison_ignores_case() {
    let config = affected(&["ACME\\WIDGET"]);
    let id = HardwareId::new("acme\\widget");

    assert_eq!(evaluate(id, config.affected_devices()), Verdict::Affected);
  }

  #[test]
  fn empty_list_never_matches() {
    let config = affected(&[]);

    for id in &["VID_1234&PID_0001", "acme\\widget", ""] {
      assert_eq!(
        evaluate(HardwareId::new(id), config.affected_devices()),
        Verdict::NotAffected
      );
    }
  }

  #[test]
  fn any_position_in_the_list_matches() {
    let entries = &["VID_0000&PID_0000", "VID_1111&PID_1111", "VID_2222&PID_2222"];
    let config = affected(entries);

    for entry in entries.iter() {
      assert_eq!(
        evaluate(HardwareId::new(entry), config.affected_devices()),
        Verdict::Affected
      );
    }
  }

  #[test]
  fn verdict_is_order_independent() {
    let forward = affected(&["VID_1111&PID_1111", "VID_2222&PID_2222"]);
    let reverse = affected(&["VID_2222&PID_2222", "VID_1111&PID_1111"]);
    let id = HardwareId::new("VID_2222&PID_2222");

    assert_eq!(
      evaluate(id, forward.affected_devices()),
      evaluate(id, reverse.affected_devices())
    );
  }
}
