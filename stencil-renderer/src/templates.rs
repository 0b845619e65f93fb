//! The fixed table of manifests rendered for every environment.
//!
//! | Family     | Template                       | Output              |
//! |------------|--------------------------------|---------------------|
//! | Kubernetes | `k8s/deployment.yaml.j2`       | `deployment.yaml`   |
//! | Kubernetes | `k8s/service.yaml.j2`          | `service.yaml`      |
//! | Kubernetes | `k8s/namespace.yaml.j2`        | `namespace.yaml`    |
//! | GitOps     | `argocd/application.yaml.j2`   | `application.yaml`  |
//! | GitOps     | `argocd/app-of-apps.yaml.j2`   | `app-of-apps.yaml`  |

use std::fmt;
use std::path::{Path, PathBuf};

/// Suffix carried by every template file and stripped from its output name.
pub const TEMPLATE_SUFFIX: &str = ".j2";

/// A group of templates sharing a subdirectory under the template root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Kubernetes,
    GitOps,
}

impl Family {
    /// Families in render order.
    pub fn all() -> &'static [Family] {
        &[Family::Kubernetes, Family::GitOps]
    }

    /// Subdirectory of the template root holding this family.
    pub fn subdir(&self) -> &'static str {
        match self {
            Family::Kubernetes => "k8s",
            Family::GitOps => "argocd",
        }
    }

    /// This family's templates in render order.
    pub fn templates(&self) -> &'static [TemplateRef] {
        match self {
            Family::Kubernetes => KUBERNETES,
            Family::GitOps => GITOPS,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Kubernetes => f.write_str("kubernetes"),
            Family::GitOps => f.write_str("gitops"),
        }
    }
}

/// One template from the fixed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateRef {
    pub family: Family,
    pub file_name: &'static str,
}

const fn template(family: Family, file_name: &'static str) -> TemplateRef {
    TemplateRef { family, file_name }
}

const KUBERNETES: &[TemplateRef] = &[
    template(Family::Kubernetes, "deployment.yaml.j2"),
    template(Family::Kubernetes, "service.yaml.j2"),
    template(Family::Kubernetes, "namespace.yaml.j2"),
];

const GITOPS: &[TemplateRef] = &[
    template(Family::GitOps, "application.yaml.j2"),
    template(Family::GitOps, "app-of-apps.yaml.j2"),
];

impl TemplateRef {
    /// Every template in render order: Kubernetes family first, then GitOps.
    pub fn all() -> impl Iterator<Item = &'static TemplateRef> {
        Family::all().iter().flat_map(|f| f.templates().iter())
    }

    /// Tera template name, e.g. `k8s/deployment.yaml.j2`.
    pub fn name(&self) -> String {
        format!("{}/{}", self.family.subdir(), self.file_name)
    }

    /// Location of the template file under `template_root`.
    pub fn source_path(&self, template_root: &Path) -> PathBuf {
        template_root.join(self.family.subdir()).join(self.file_name)
    }

    /// Output file name with the template suffix stripped.
    pub fn output_name(&self) -> &'static str {
        self.file_name
            .strip_suffix(TEMPLATE_SUFFIX)
            .unwrap_or(self.file_name)
    }

    /// Destination under `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.output_name())
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name)
    }
}
