/// One possible match for the query face.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub person_id: String,
    pub person_name: Option<String>,
    /// Match strength in `[0, 1]`.
    pub confidence: f64,
}

/// Ranked identification answer. Candidates are in non-increasing
/// confidence order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IdentifyResult {
    /// Face id the remote assigned to the query face, if it reported one.
    pub face_id: Option<String>,
    pub candidates: Vec<Candidate>,
}

impl IdentifyResult {
    /// Builds a result, restoring descending order if the remote broke it.
    /// The sort is stable, so equal confidences keep the remote's order.
    pub fn new(face_id: Option<String>, mut candidates: Vec<Candidate>) -> Self {
        candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Self {
            face_id,
            candidates,
        }
    }

    pub fn top(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates whose confidence is at least `threshold` (in `[0, 1]`).
    pub fn above(&self, threshold: f64) -> impl Iterator<Item = &Candidate> {
        self.candidates
            .iter()
            .take_while(move |c| c.confidence >= threshold)
    }
}
