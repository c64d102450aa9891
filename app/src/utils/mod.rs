pub mod ignore_colors;
pub mod output;
pub mod paths;
