use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-GIT-0001
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-GIT-0001",
        provider: Provider::GitHub,
        service: "repositories",
        short_code: "private",
        summary: "Github repository shouldn't be public.",
        impact: "Anyone can read the contents of the GitHub repository and leak IP",
        resolution: "Make sensitive or commercially important repositories private",
        explanation: "Github repository should be set to be private. You can do this by either \
                      setting the private attribute to true or the visibility attribute to \
                      internal or private.",
        links: &[
            "https://docs.github.com/en/github/creating-cloning-and-archiving-repositories/about-repository-visibility",
            "https://docs.github.com/en/github/creating-cloning-and-archiving-repositories/about-repository-visibility#about-internal-repositories",
        ],
        severity: Severity::Critical,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for repo in &state.github.repositories {
        if repo.metadata.is_unmanaged() {
            continue;
        }
        if repo.public.is_true() {
            results.add("Repository is public.", &repo.public);
        } else {
            results.add_passed(&repo.metadata);
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::adapt;
    use crate::block::{Block, Module};
    use crate::providers::github::Repository;
    use crate::types::{BoolValue, Metadata, StringValue};

    #[test]
    fn repositories_classified() {
        let state = adapt(&[Module::root(vec![
            Block::resource("github_repository", "open"),
            Block::resource("github_repository", "closed").with_attribute("private", true),
            Block::resource("github_repository", "internal")
                .with_attribute("visibility", "internal"),
        ])]);
        let results = CHECK.run(&state);
        assert_eq!(results.len(), 3);
        assert_eq!(results.failed().count(), 1);
        assert_eq!(
            results.failed().next().unwrap().metadata.reference(),
            "github_repository.open"
        );
    }

    #[test]
    fn unmanaged_repository_is_skipped() {
        let mut state = State::default();
        state.github.repositories.push(Repository {
            metadata: Metadata::unmanaged(),
            name: StringValue::new_default(String::new(), &Metadata::unmanaged()),
            public: BoolValue::new_default(true, &Metadata::unmanaged()),
            vulnerability_alerts: BoolValue::new_default(false, &Metadata::unmanaged()),
        });
        assert!(CHECK.run(&state).is_empty());
    }
}
