#[cfg(test)]
mod tests {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;
    /// Fingerprint of the named opcode table; regenerate with `print_opcode_table_hash`.
    const EXPECTED_OPCODE_TABLE_HASH: u64 = 0x485e2ccd25a570bc;

    fn fnv1a64(mut h: u64, bytes: &[u8]) -> u64 {
        for b in bytes {
            h ^= *b as u64;
            h = h.wrapping_mul(FNV_PRIME);
        }
        h
    }

    macro_rules! hash_opcode_table {
        (
            $( $(#[$doc:meta])* $name:ident = $opcode:expr, $mnemonic:literal ),* $(,)?
        ) => {{
            let mut h = FNV_OFFSET;
            $(
                h = fnv1a64(h, stringify!($name).as_bytes());
                h = fnv1a64(h, &[crate::virtual_machine::isa::$name.0]);
                h = fnv1a64(h, $mnemonic.as_bytes());
            )*
            h
        }};
    }

    fn current_opcode_table_hash() -> u64 {
        crate::for_each_opcode!(hash_opcode_table)
    }

    #[test]
    #[ignore]
    fn print_opcode_table_hash() {
        println!("OPCODE_TABLE_HASH=0x{:016x}", current_opcode_table_hash());
    }

    #[test]
    fn opcode_table_hash_unchanged() {
        assert_eq!(current_opcode_table_hash(), EXPECTED_OPCODE_TABLE_HASH);
    }
}
