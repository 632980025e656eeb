/// Vote direction as sent by clients: `1` casts a vote, `0` withdraws it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Remove,
    Add,
}

impl VoteDirection {
    pub fn as_i32(&self) -> i32 {
        match self {
            VoteDirection::Remove => 0,
            VoteDirection::Add => 1,
        }
    }
}

impl TryFrom<i32> for VoteDirection {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VoteDirection::Remove),
            1 => Ok(VoteDirection::Add),
            other => Err(format!("Invalid vote direction: {other} (expected 0 or 1)")),
        }
    }
}
