use std::rc::Rc;
use thiserror::Error;

/// Period of one typewriter tick in milliseconds.
pub const TICK_PERIOD_MS: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleListError {
    #[error("role list must contain at least one role")]
    Empty,
    #[error("role at position {index} is empty")]
    EmptyRole { index: usize },
}

/// Ordered, non-empty list of roles shown by the typewriter. Clones share storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleList {
    roles: Rc<[String]>,
}

impl RoleList {
    pub fn new<I, S>(roles: I) -> Result<Self, RoleListError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: Vec<String> = roles.into_iter().map(Into::into).collect();

        if roles.is_empty() {
            return Err(RoleListError::Empty);
        }

        if let Some(index) = roles.iter().position(|role| role.is_empty()) {
            return Err(RoleListError::EmptyRole { index });
        }

        Ok(Self {
            roles: roles.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Role at `index`, wrapping around the list.
    pub fn role(&self, index: usize) -> &str {
        &self.roles[index % self.roles.len()]
    }

    fn char_len(&self, index: usize) -> usize {
        self.role(index).chars().count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Growing,
    Shrinking,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypewriterState {
    pub role_index: usize,
    pub char_count: usize,
    pub direction: Direction,
}

impl Default for TypewriterState {
    fn default() -> Self {
        Self::at_role(0)
    }
}

impl TypewriterState {
    pub fn at_role(role_index: usize) -> Self {
        Self {
            role_index,
            char_count: 0,
            direction: Direction::Growing,
        }
    }

    /// Advances one step. Reaching full length only flips the direction, so the
    /// full role stays visible for one extra tick; reaching zero flips back and
    /// moves to the next role in the same step.
    pub fn tick(self, roles: &RoleList) -> Self {
        let role_len = roles.char_len(self.role_index);

        match self.direction {
            Direction::Growing if self.char_count >= role_len => Self {
                char_count: role_len,
                direction: Direction::Shrinking,
                ..self
            },
            Direction::Growing => Self {
                char_count: self.char_count + 1,
                ..self
            },
            Direction::Shrinking => {
                let char_count = self.char_count.saturating_sub(1);
                if char_count == 0 {
                    Self::at_role((self.role_index + 1) % roles.len())
                } else {
                    Self { char_count, ..self }
                }
            }
        }
    }

    pub fn visible_text<'a>(&self, roles: &'a RoleList) -> &'a str {
        let role = roles.role(self.role_index);
        match role.char_indices().nth(self.char_count) {
            Some((end, _)) => &role[..end],
            None => role,
        }
    }
}

/// Owns the role list and drives [`TypewriterState`] one tick at a time.
#[derive(Clone, Debug)]
pub struct TypewriterEngine {
    roles: RoleList,
    state: TypewriterState,
}

impl TypewriterEngine {
    pub fn new(roles: RoleList) -> Self {
        Self {
            roles,
            state: TypewriterState::default(),
        }
    }

    pub fn tick(&mut self) -> &str {
        self.state = self.state.tick(&self.roles);
        self.text()
    }

    pub fn text(&self) -> &str {
        self.state.visible_text(&self.roles)
    }

    pub fn state(&self) -> TypewriterState {
        self.state
    }

    pub fn roles(&self) -> &RoleList {
        &self.roles
    }

    /// Swaps in a new role list and restarts from its first role. Returns
    /// `false` when the list is unchanged.
    pub fn replace_roles(&mut self, roles: RoleList) -> bool {
        if self.roles == roles {
            return false;
        }

        self.roles = roles;
        self.state = TypewriterState::default();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(values: &[&str]) -> RoleList {
        RoleList::new(values.iter().copied()).expect("non-empty roles")
    }

    #[test]
    fn empty_role_list_is_rejected() {
        assert_eq!(RoleList::new(Vec::<String>::new()), Err(RoleListError::Empty));
    }

    #[test]
    fn empty_role_is_rejected() {
        assert_eq!(
            RoleList::new(["Designer", ""]),
            Err(RoleListError::EmptyRole { index: 1 })
        );
    }

    #[test]
    fn two_role_scenario_matches_expected_frames() {
        let mut engine = TypewriterEngine::new(roles(&["AB", "C"]));
        let frames: Vec<String> = (0..9).map(|_| engine.tick().to_string()).collect();

        assert_eq!(frames, ["A", "AB", "AB", "A", "", "C", "C", "", "A"]);
    }

    #[test]
    fn flip_ticks_change_direction_without_changing_text() {
        let list = roles(&["AB", "C"]);
        let full = TypewriterState {
            role_index: 0,
            char_count: 2,
            direction: Direction::Growing,
        };

        let flipped = full.tick(&list);
        assert_eq!(flipped.direction, Direction::Shrinking);
        assert_eq!(flipped.visible_text(&list), "AB");

        let emptied = TypewriterState {
            role_index: 1,
            char_count: 1,
            direction: Direction::Shrinking,
        }
        .tick(&list);
        assert_eq!(emptied, TypewriterState::at_role(0));
    }

    #[test]
    fn each_role_grows_holds_then_shrinks() {
        let list = roles(&["Analog IC Designer", "PLL • VCO", "LNA"]);

        for (index, role) in list.iter().enumerate() {
            let chars: Vec<char> = role.chars().collect();
            let mut state = TypewriterState::at_role(index);
            let mut frames = Vec::new();
            for _ in 0..(2 * chars.len() + 1) {
                state = state.tick(&list);
                frames.push(state.visible_text(&list).to_string());
            }

            let mut expected: Vec<String> = (1..=chars.len())
                .map(|n| chars[..n].iter().collect())
                .collect();
            expected.push(role.to_string());
            expected.extend((0..chars.len()).rev().map(|n| chars[..n].iter().collect::<String>()));

            assert_eq!(frames, expected, "frames for {role:?}");
            assert_eq!(state, TypewriterState::at_role((index + 1) % list.len()));
        }
    }

    #[test]
    fn role_index_returns_after_one_cycle_per_role() {
        let list = roles(&["Analog IC Designer", "VLSI & Embedded Enthusiast", "PLL • VCO • PFD Focus"]);
        let start = TypewriterState::at_role(1);
        let mut state = start;
        let mut completed = 0;

        while completed < list.len() {
            let next = state.tick(&list);
            if next.role_index != state.role_index {
                completed += 1;
            }
            state = next;
        }

        assert_eq!(state, start);
    }

    #[test]
    fn char_count_never_exceeds_role_length() {
        let list = roles(&["AB", "C", "PLL •"]);
        let mut state = TypewriterState::default();

        for _ in 0..200 {
            state = state.tick(&list);
            assert!(state.char_count <= list.role(state.role_index).chars().count());
        }
    }

    #[test]
    fn replacing_roles_restarts_from_first_role() {
        let mut engine = TypewriterEngine::new(roles(&["AB"]));
        engine.tick();

        assert!(!engine.replace_roles(roles(&["AB"])));
        assert_eq!(engine.text(), "A");

        assert!(engine.replace_roles(roles(&["XYZ", "Q"])));
        assert_eq!(engine.state(), TypewriterState::default());
        assert_eq!(engine.tick(), "X");
    }
}
