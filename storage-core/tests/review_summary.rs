use storage_core::{GraphError, ReviewInput, build_review, build_summary, validate_requests};
use storage_types::{DeviceTable, InstallationScenario, MountPointRequest};

const DEVICES: &str = r#"{
    "disk-a": {"id": "disk-a", "name": "vda", "size": 21474836480, "description": "Virtio Block Device"},
    "disk-a1": {"id": "disk-a1", "name": "vda1", "size": 1073741824, "parents": ["disk-a"], "format-type": "xfs"},
    "disk-a2": {"id": "disk-a2", "name": "vda2", "size": 20400046080, "parents": ["disk-a"]},
    "luks-a2": {"id": "luks-a2", "name": "luks-vda2", "size": 20383268864, "parents": ["disk-a2"]},
    "lv-root": {"id": "lv-root", "name": "fedora-root", "size": 15032385536, "parents": ["luks-a2"]},
    "lv-home": {"id": "lv-home", "name": "fedora-home", "size": 5350883328, "parents": ["luks-a2"]},
    "disk-b": {"id": "disk-b", "name": "vdb", "size": 10737418240, "description": "Virtio Block Device"},
    "disk-b1": {"id": "disk-b1", "name": "vdb1", "size": 10736369664, "parents": ["disk-b"]}
}"#;

const REQUESTS: &str = r#"[
    {"device-spec": "vda1", "format-type": "xfs", "mount-point": "/boot", "reformat": true},
    {"device-spec": "fedora-root", "format-type": "btrfs", "mount-point": "/", "reformat": true},
    {"device-spec": "vdb1", "mount-point": "/var/lib/containers"},
    {"device-spec": "fedora-home", "mount-point": "/home"}
]"#;

fn fixtures() -> (DeviceTable, Vec<MountPointRequest>) {
    let devices = serde_json::from_str(DEVICES).expect("device fixture");
    let requests = serde_json::from_str(REQUESTS).expect("request fixture");
    (devices, requests)
}

fn rendered(rows: &[storage_types::SummaryRow]) -> Vec<String> {
    rows.iter().map(ToString::to_string).collect()
}

#[test]
fn requests_nested_under_encrypted_lvm_reach_their_disk() {
    let (devices, requests) = fixtures();
    let selected = vec!["disk-a".to_string(), "disk-b".to_string()];

    let summary = build_summary(&selected, &devices, Some(&requests));

    assert!(summary.diagnostics.is_empty(), "{:?}", summary.diagnostics);
    assert_eq!(
        rendered(&summary.disks[0].rows),
        [
            "vda1: format as xfs, /boot, reformat",
            "fedora-root: format as btrfs, /, reformat",
            "fedora-home: /home",
        ]
    );
    assert_eq!(
        rendered(&summary.disks[1].rows),
        ["vdb1: /var/lib/containers"]
    );
}

#[test]
fn disk_heading_shows_size_name_and_description() {
    let (devices, _) = fixtures();
    let selected = vec!["disk-b".to_string()];

    let summary = build_summary(&selected, &devices, None);

    let heading = summary.disks[0].heading();
    assert!(heading.contains("vdb (Virtio Block Device)"), "{heading}");
    assert!(summary.disks[0].rows.is_empty());
}

#[test]
fn corrupt_table_degrades_to_diagnostics() {
    let (mut devices, requests) = fixtures();
    devices.insert(storage_types::Device::new("disk-b1", "vdb1", 1).with_parent("nowhere"));
    let selected = vec!["disk-a".to_string(), "disk-b".to_string()];

    let summary = build_summary(&selected, &devices, Some(&requests));

    assert_eq!(summary.disks.len(), 2);
    assert!(summary.disks[1].rows.is_empty());
    assert!(
        summary
            .diagnostics
            .contains(&GraphError::MissingDevice("nowhere".to_string()))
    );
}

#[test]
fn full_review_for_mount_point_mapping() {
    let (devices, requests) = fixtures();
    let selected = vec!["disk-a".to_string()];
    let input = ReviewInput {
        operating_system: "Fedora Linux 41 (Workstation Edition)",
        language: "English (United States)",
        scenario: InstallationScenario::MountPointMapping,
        selected_disks: &selected,
        devices: &devices,
        requests: &requests,
    };

    let (review, diagnostics) = build_review(&input, None);

    assert!(diagnostics.is_empty());
    assert_eq!(review.encryption_label(), None);
    assert_eq!(review.disks[0].rows.len(), 3);
    assert!(validate_requests(&requests, &devices).is_empty());
}
