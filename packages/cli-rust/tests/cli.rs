use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated HOME plus an app directory populated with `files`
struct Fixture {
    home: TempDir,
    app: TempDir,
}

impl Fixture {
    fn new(files: &[(&str, &str)]) -> Self {
        let fixture = Self {
            home: TempDir::new().unwrap(),
            app: TempDir::new().unwrap(),
        };
        for (name, contents) in files {
            let path = fixture.app.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, contents).unwrap();
        }
        fixture
    }

    /// Point the unit directory at a scratch dir via config.json
    fn with_unit_dir(self) -> Self {
        let config_dir = self.home.path().join(".config/servicify");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.json"),
            format!(
                "{{\n  // scratch unit dir\n  \"version\": 1,\n  \"unit_dir\": \"{}\"\n}}",
                self.unit_dir().display()
            ),
        )
        .unwrap();
        fs::create_dir_all(self.unit_dir()).unwrap();
        self
    }

    fn unit_dir(&self) -> PathBuf {
        self.home.path().join("units")
    }

    /// Put a `systemctl` on PATH that exits with `code` and prints nothing
    fn with_fake_systemctl(self, code: i32) -> Self {
        let bin = self.bin_dir();
        fs::create_dir_all(&bin).unwrap();
        let script = bin.join("systemctl");
        fs::write(&script, format!("#!/bin/sh\nexit {code}\n")).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        self
    }

    fn bin_dir(&self) -> PathBuf {
        self.home.path().join("bin")
    }

    fn app_dir(&self) -> PathBuf {
        self.app.path().canonicalize().unwrap()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("servicify").unwrap();
        let path = format!(
            "{}:{}",
            self.bin_dir().display(),
            std::env::var("PATH").unwrap_or_default()
        );
        cmd.env("HOME", self.home.path())
            .env("PATH", path)
            .env_remove("SUDO_USER")
            .env_remove("RUST_LOG")
            .arg("--no-color");
        cmd
    }

    fn dry_run(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["install", "web"])
            .arg(self.app.path())
            .args(["--interpreter", "/bin/sh", "--user", "deploy", "--dry-run"]);
        cmd
    }
}

fn unit_files(dir: &Path) -> usize {
    fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

#[test]
fn dry_run_selects_app_js_by_fallback() {
    let fixture = Fixture::new(&[("app.js", "console.log('hi')")]);
    let exec_start = format!("ExecStart=/bin/sh {}/app.js\n", fixture.app_dir().display());

    fixture
        .dry_run()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Managed by servicify\n[Unit]\n"))
        .stdout(predicate::str::contains(exec_start))
        .stdout(predicate::str::contains("User=deploy\n"))
        .stdout(predicate::str::contains(format!(
            "WorkingDirectory={}\n",
            fixture.app_dir().display()
        )))
        .stdout(predicate::str::contains("Restart=on-failure\n"));
}

#[test]
fn dry_run_output_is_byte_identical_across_runs() {
    let fixture = Fixture::new(&[("index.js", "")]);

    let first = fixture.dry_run().output().unwrap();
    let second = fixture.dry_run().output().unwrap();

    assert!(first.status.success());
    assert!(!first.stdout.is_empty());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn dry_run_prefers_manifest_main_over_index_js() {
    let fixture = Fixture::new(&[
        ("package.json", r#"{"name": "web", "main": "server.js"}"#),
        ("index.js", ""),
        ("server.js", ""),
    ]);

    fixture
        .dry_run()
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "ExecStart=/bin/sh {}/server.js\n",
            fixture.app_dir().display()
        )));
}

#[test]
fn dry_run_writes_nothing_and_needs_no_root() {
    let fixture = Fixture::new(&[("app.js", "")]).with_unit_dir();

    fixture.dry_run().assert().success();

    assert_eq!(unit_files(&fixture.unit_dir()), 0);
}

#[test]
fn undetectable_entry_fails_with_hint() {
    let fixture = Fixture::new(&[("README.md", "")]);

    fixture
        .dry_run()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not detect an entry point"))
        .stderr(predicate::str::contains("--entry"));
}

#[test]
fn missing_explicit_entry_fails() {
    let fixture = Fixture::new(&[("app.js", "")]);

    fixture
        .dry_run()
        .args(["--entry", "bin/www"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Entry file not found"));
}

#[test]
fn install_without_root_fails_before_touching_files() {
    if servicify_core::privilege::is_elevated() {
        // Running as root would reach the real systemctl
        return;
    }
    let fixture = Fixture::new(&[("app.js", "")]).with_unit_dir();

    fixture
        .cmd()
        .args(["install", "web"])
        .arg(fixture.app.path())
        .args(["--interpreter", "/bin/sh"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("requires root"))
        .stderr(predicate::str::contains("sudo servicify install"));

    assert_eq!(unit_files(&fixture.unit_dir()), 0);
}

#[test]
fn privileged_verbs_refuse_without_root() {
    if servicify_core::privilege::is_elevated() {
        return;
    }
    let fixture = Fixture::new(&[]);

    for verb in ["uninstall", "start", "stop", "restart"] {
        fixture
            .cmd()
            .args([verb, "web"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(format!("'{verb}' requires root")));
    }
}

#[test]
fn invalid_service_name_is_rejected() {
    let fixture = Fixture::new(&[("app.js", "")]);

    fixture
        .cmd()
        .args(["install", "../evil"])
        .arg(fixture.app.path())
        .args(["--interpreter", "/bin/sh", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid service name"));
}

#[test]
fn unknown_verb_exits_one() {
    let fixture = Fixture::new(&[]);

    fixture.cmd().arg("frobnicate").assert().code(1);
}

#[test]
fn unknown_flag_exits_one() {
    let fixture = Fixture::new(&[("app.js", "")]);

    fixture.dry_run().arg("--bogus").assert().code(1);
}

#[test]
fn help_exits_zero() {
    let fixture = Fixture::new(&[]);

    fixture
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("logs"));
}

#[test]
fn malformed_config_is_reported() {
    let fixture = Fixture::new(&[("app.js", "")]);
    let config_dir = fixture.home.path().join(".config/servicify");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.json"), r#"{"version": 1, "restart": "always"}"#).unwrap();

    fixture
        .dry_run()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn start_script_of_overridden_interpreter_is_used() {
    let fixture = Fixture::new(&[
        ("package.json", r#"{"scripts": {"start": "bun server.ts"}}"#),
        ("server.ts", ""),
        ("index.js", ""),
    ]);
    let bun = fixture.home.path().join("bun");
    fs::write(&bun, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&bun, fs::Permissions::from_mode(0o755)).unwrap();

    fixture
        .cmd()
        .args(["install", "web"])
        .arg(fixture.app.path())
        .arg("--interpreter")
        .arg(&bun)
        .args(["--user", "deploy", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "ExecStart={} {}/server.ts\n",
            bun.display(),
            fixture.app_dir().display()
        )));
}

#[test]
fn verbose_dry_run_logs_entry_source() {
    let fixture = Fixture::new(&[("app.js", "")]);

    fixture
        .dry_run()
        .arg("-v")
        .assert()
        .success()
        .stderr(predicate::str::contains("Entry point app.js (from conventional filename)"));
}

#[test]
fn list_without_managed_units_prints_empty_state() {
    let fixture = Fixture::new(&[]).with_unit_dir().with_fake_systemctl(0);

    fixture
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "No services managed by servicify in {}.",
            fixture.unit_dir().display()
        )));
}

#[test]
fn status_of_unknown_service_exits_zero() {
    let fixture = Fixture::new(&[]).with_unit_dir().with_fake_systemctl(4);

    fixture
        .cmd()
        .args(["status", "ghost"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No unit file at"));
}
