#![allow(dead_code)]

use gridiron_cli::run;

pub struct Output {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn gridiron(args: &[&str]) -> Output {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let argv = std::iter::once("gridiron").chain(args.iter().copied());
    let code = run(argv, &mut out, &mut err);
    Output {
        code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

/// Remove every GRIDIRON_* variable. Callers hold `#[serial]`.
pub fn clear_env() {
    for key in ["GRIDIRON_CONFIG", "GRIDIRON_SEED", "GRIDIRON_PLAYS"] {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

pub fn set_env(key: &str, value: impl AsRef<std::ffi::OsStr>) {
    unsafe {
        std::env::set_var(key, value);
    }
}
