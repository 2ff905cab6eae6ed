//! Final bundle assembly
//!
//! Merges the static scaffold and the dynamically generated artifacts into
//! the deliverable bundle. Path uniqueness is already guaranteed by the
//! orchestrator's produced-path tracking; assembly is a deterministic
//! concatenation plus the dependency rule table.

use tracing::debug;

use crate::architecture::Architecture;
use crate::bundle::{FileArtifact, GenerationLogEntry, ProjectBundle};
use crate::scaffold;

/// Assemble the final project bundle.
///
/// Static files come first in the output (they were produced first), then
/// dynamic files in generation order. The dependency map is computed from
/// the architecture's selections and the generation log is passed through
/// unchanged.
#[must_use]
pub fn assemble(
    static_files: Vec<FileArtifact>,
    dynamic_files: Vec<FileArtifact>,
    arch: &Architecture,
    generation_log: Vec<GenerationLogEntry>,
) -> ProjectBundle {
    let dependencies = scaffold::dependency_map(arch);

    let mut files = static_files;
    files.extend(dynamic_files);

    debug!(
        project = %arch.name,
        files = files.len(),
        dependencies = dependencies.len(),
        "Assembled project bundle"
    );

    ProjectBundle::new(&arch.name, files, dependencies, generation_log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::architecture::{AuthProvider, StateManagement};
    use crate::prioritizer::Tier;

    #[test]
    fn test_static_files_precede_dynamic_files() {
        let arch = Architecture::new("storefront");
        let bundle = assemble(
            vec![FileArtifact::new("package.json", "{}")],
            vec![FileArtifact::new("src/main.tsx", "// entry")],
            &arch,
            vec![],
        );

        assert_eq!(bundle.files[0].path, "package.json");
        assert_eq!(bundle.files[1].path, "src/main.tsx");
        assert_eq!(bundle.name, "storefront");
    }

    #[test]
    fn test_dependencies_follow_architecture_selections() {
        let mut arch = Architecture::new("storefront");
        arch.stack.state_management = StateManagement::Zustand;
        arch.auth.provider = AuthProvider::Auth0;

        let bundle = assemble(vec![], vec![], &arch, vec![]);
        assert!(bundle.dependencies.contains_key("react"));
        assert!(bundle.dependencies.contains_key("zustand"));
        assert!(bundle.dependencies.contains_key("@auth0/auth0-react"));
        assert!(!bundle.dependencies.contains_key("@supabase/supabase-js"));
    }

    #[test]
    fn test_generation_log_passes_through_unchanged() {
        let arch = Architecture::new("storefront");
        let log = vec![
            GenerationLogEntry::completed(Tier::Critical, 0, 5),
            GenerationLogEntry::completed(Tier::Core, 0, 2),
        ];

        let bundle = assemble(vec![], vec![], &arch, log);
        assert_eq!(bundle.generation_log.len(), 2);
        assert_eq!(bundle.generation_log[0].phase, "critical");
        assert_eq!(bundle.generation_log[1].count, 2);
    }
}
