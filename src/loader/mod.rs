// Startup data loading

pub mod seed;
