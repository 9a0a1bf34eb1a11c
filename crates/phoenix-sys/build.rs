use std::env;
use std::path::PathBuf;

/// Platform libraries the vendored Phoenix binary is linked against on the
/// roboRIO. They must be present in the final executable for the loader to
/// resolve the vendored library's own dependencies.
const ROBORIO_LIBS: &[&str] = &[
    "FRC_NetworkCommunication",
    "NiFpga",
    "NiFpgaLv",
    "niriodevenum",
    "niriosession",
    "NiRioSrv",
    "RoboRIO_FRC_ChipObject",
    "visa",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PHOENIX_LIB_DIR");

    let staged_dir = match env::var_os("PHOENIX_LIB_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let manifest_dir = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").unwrap_or_default());
            manifest_dir.join("..").join("..").join("lib")
        }
    };
    println!("cargo:rustc-env=PHOENIX_STAGED_DIR={}", staged_dir.display());

    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if env::var_os("CARGO_FEATURE_ROBORIO").is_some() && target_arch == "arm" && target_os == "linux" {
        println!("cargo:rustc-link-search=native={}", staged_dir.display());
        for lib in ROBORIO_LIBS {
            println!("cargo:rustc-link-lib=dylib={lib}");
        }
        println!("cargo:rustc-link-lib=stdc++");
    }
}
