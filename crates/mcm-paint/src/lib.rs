// ABOUTME: Paints for the modellers' colour mixer.
// ABOUTME: Rated colours, mixing by parts, paint series files and saved mixing sessions.

pub mod colour;
pub mod mixture;
pub mod rating;
pub mod series;
pub mod session;

pub use colour::{ideal_colours, Colour, ColourSource, NamedColour, Paint};
pub use mixture::{gcd, gcd_of, MixedColour, NamedMixedColour, PaintBlob};
pub use rating::{Finish, Fluorescence, Metallic, RatingError, Transparency};
pub use series::{PaintSeries, SeriesError, SeriesId, SeriesPaint};
pub use session::{MixingSession, SessionError};
