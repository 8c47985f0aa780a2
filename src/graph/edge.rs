/// There is exactly one edge kind in the AND/OR graph: (chemical -> reaction)
/// reads "this reaction is one option for making this chemical", and
/// (reaction -> chemical) reads "this chemical is one required precursor of
/// this reaction". The direction is implied by the endpoints' kinds, so the
/// edge weight itself carries no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Link;

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "->")
    }
}
