use indexmap::IndexSet;
use kenari_ir::FunctionFamily;
use std::sync::OnceLock;

/// Root package the synthetic function interfaces and `Unit` live in.
pub const BUILTINS_PACKAGE: &str = "kenari";

pub const MAX_FUNCTION_ARITY: u8 = 255;

pub fn function_class_symbol_name(family: FunctionFamily, arity: u8) -> String {
    format!("kclass:{}.{}{}", BUILTINS_PACKAGE, family.name(), arity)
}

pub fn function_invoke_symbol_name(family: FunctionFamily, arity: u8) -> String {
    format!("kfun:{}.{}{}.invoke", BUILTINS_PACKAGE, family.name(), arity)
}

// FNV-1a, 64 bit. Linkage hashes are compared across separately built
// artifacts, so the algorithm and its constants are part of the format.
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

pub fn hash_mangle(mangled: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in mangled.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

// Built once, frozen afterwards.
fn special_hashes() -> &'static IndexSet<u64> {
    static SPECIAL: OnceLock<IndexSet<u64>> = OnceLock::new();
    SPECIAL.get_or_init(|| {
        let mut hashes = IndexSet::default();
        for family in FunctionFamily::ALL {
            for arity in 0..=MAX_FUNCTION_ARITY {
                hashes.insert(hash_mangle(&function_class_symbol_name(family, arity)));
            }
        }
        hashes
    })
}

/// Whether a mangled-name hash belongs to a builtin parametrized function
/// interface rather than a user class of the same apparent shape.
pub fn is_special_hash(hash: u64) -> bool {
    special_hashes().contains(&hash)
}
