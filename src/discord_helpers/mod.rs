pub mod multipage_embed;
pub mod serenity_host;

pub use multipage_embed::{EmbedPaginator, Pacing, TextPages};
pub use serenity_host::SerenityHost;
