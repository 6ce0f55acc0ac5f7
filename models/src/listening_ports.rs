use std::collections::BTreeSet;

use serde::Serialize;

/// Loopback ports a process is listening on.
///
/// Always ascending, never contains duplicates or port 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ListeningPorts(Vec<u16>);

impl ListeningPorts {
    pub fn from_ports<I>(ports: I) -> Self
    where
        I: IntoIterator<Item = u16>,
    {
        let unique: BTreeSet<u16> = ports.into_iter().filter(|&port| port != 0).collect();
        Self(unique.into_iter().collect())
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowest listening port, if any.
    pub fn first(&self) -> Option<u16> {
        self.0.first().copied()
    }

    pub fn into_vec(self) -> Vec<u16> {
        self.0
    }
}

impl FromIterator<u16> for ListeningPorts {
    fn from_iter<T: IntoIterator<Item = u16>>(iter: T) -> Self {
        Self::from_ports(iter)
    }
}
