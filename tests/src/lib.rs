pub mod cp_swap;
