//! Resolves the target's byte order and pointer width and exposes them to the
//! crate as `endianbytes_order` / `endianbytes_width` cfgs.

use std::env;

use endianbytes_layout::{Arch, LayoutError};

const ORDER_OVERRIDE: &str = "ENDIANBYTES_BYTE_ORDER";
const TARGET_ENDIAN: &str = "CARGO_CFG_TARGET_ENDIAN";
const TARGET_POINTER_WIDTH: &str = "CARGO_CFG_TARGET_POINTER_WIDTH";

fn main() {
    println!("cargo::rerun-if-env-changed={ORDER_OVERRIDE}");
    println!("cargo::rustc-check-cfg=cfg(endianbytes_order, values(\"little\", \"big\", \"middle\"))");
    println!("cargo::rustc-check-cfg=cfg(endianbytes_width, values(\"4\", \"8\"))");

    let arch = match native_arch() {
        Ok(arch) => arch,
        Err(err) => panic!("endianbytes cannot describe this target: {err}"),
    };
    if env::var_os(ORDER_OVERRIDE).is_some() {
        println!("cargo::warning=endianbytes: byte order overridden by {ORDER_OVERRIDE}: {arch}");
    }

    println!("cargo::rustc-cfg=endianbytes_order=\"{}\"", arch.order);
    println!("cargo::rustc-cfg=endianbytes_width=\"{}\"", arch.width);
}

fn native_arch() -> Result<Arch, LayoutError> {
    let (order_var, order) = match env::var(ORDER_OVERRIDE) {
        Ok(order) => (ORDER_OVERRIDE, order),
        Err(_) => (
            TARGET_ENDIAN,
            env::var(TARGET_ENDIAN).map_err(|_| LayoutError::MissingInput(TARGET_ENDIAN))?,
        ),
    };
    let bits =
        env::var(TARGET_POINTER_WIDTH).map_err(|_| LayoutError::MissingInput(TARGET_POINTER_WIDTH))?;
    Arch::from_vars(order_var, &order, TARGET_POINTER_WIDTH, &bits)
}
