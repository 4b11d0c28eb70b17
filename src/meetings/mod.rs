pub mod provisioner;

pub use provisioner::MeetingProvisioner;
