use std::env;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(openssl3)");
    println!("cargo:rerun-if-env-changed=DEP_OPENSSL_VERSION_NUMBER");

    // Exported by openssl-sys as a hex OPENSSL_VERSION_NUMBER
    let Ok(version) = env::var("DEP_OPENSSL_VERSION_NUMBER") else {
        println!("cargo:warning=OpenSSL version unknown, legacy provider loading disabled");
        return;
    };

    match u64::from_str_radix(&version, 16) {
        Ok(number) if number >= 0x3_00_00_00_0 => println!("cargo:rustc-cfg=openssl3"),
        Ok(_) => {}
        Err(e) => println!("cargo:warning=Unparsable OpenSSL version '{version}': {e}"),
    }
}
