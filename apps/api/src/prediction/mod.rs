// Candidate admission prediction: competency scores from the database are
// ordered into a feature vector and scored by a pre-trained random forest.

pub mod classifier;
pub mod features;
pub mod forest;
pub mod handlers;
