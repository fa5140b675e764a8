/// Set of functions used throughout to assure the correctness of packing results.
pub mod assertions;
