pub mod member;
pub mod repository;
pub mod team;

pub use member::Member;
pub use repository::MemberRepository;
pub use team::Team;
