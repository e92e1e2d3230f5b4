//! The index types used in the analysis.

index_vec::define_index_type! {
    pub struct SymbolId = u32;
}

index_vec::define_index_type! {
    pub struct DeclId = u32;
}
