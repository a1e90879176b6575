/// Mermaid rendering through the `mmdc` command-line tool.
use super::{DiagramError, DiagramRenderer};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// One way of invoking the Mermaid CLI.
///
/// The renderer appends `-i <input.mmd> -o <output.png>` to `leading_args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTool {
    pub program: PathBuf,
    pub leading_args: Vec<OsString>,
}

impl RenderTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args.extend(args.into_iter().map(Into::into));
        self
    }

    fn name(&self) -> String {
        self.program
            .file_name()
            .map_or_else(|| self.program.display().to_string(), |n| n.to_string_lossy().into_owned())
    }

    /// The tools found on `PATH`, in the order they are tried: a global `mmdc`
    /// install first, then `npx` fetching `@mermaid-js/mermaid-cli`.
    pub fn discover() -> Vec<Self> {
        let mut tools = Vec::new();
        if let Some(mmdc) = find_on_path("mmdc") {
            tools.push(Self::new(mmdc));
        }
        if let Some(npx) = find_on_path("npx") {
            tools.push(Self::new(npx).with_args(["-y", "@mermaid-js/mermaid-cli"]));
        }
        tools
    }
}

/// Locate an executable in the directories listed in `PATH`.
pub fn find_on_path(name: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths).find_map(|dir| {
        executable_names(name)
            .into_iter()
            .map(|candidate| dir.join(candidate))
            .find(|path| path.is_file())
    })
}

#[cfg(windows)]
fn executable_names(name: &str) -> Vec<String> {
    ["exe", "cmd", "bat"]
        .iter()
        .map(|ext| format!("{name}.{ext}"))
        .chain(std::iter::once(name.to_string()))
        .collect()
}

#[cfg(not(windows))]
fn executable_names(name: &str) -> Vec<String> {
    vec![name.to_string()]
}

/// Scratch space and async runtime, created on the first render.
struct Workspace {
    dir: TempDir,
    runtime: Runtime,
    tools: Vec<RenderTool>,
}

/// Renders Mermaid source with the Mermaid CLI.
///
/// Each render writes `diagram-<n>.mmd` into a private temporary directory and
/// asks each tool in turn for `diagram-<n>.png`. A tool counts as successful only
/// if it exits with status 0 and leaves a non-empty image behind. Every attempt
/// is bounded by the timeout; a tool still running when it expires is killed.
/// The directory and every image in it are removed when the renderer is dropped.
pub struct MermaidCli {
    timeout: Duration,
    tools: Option<Vec<RenderTool>>,
    workspace: Option<Workspace>,
    rendered: usize,
}

impl MermaidCli {
    /// Create a renderer that discovers its tools on `PATH` at first use.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            tools: None,
            workspace: None,
            rendered: 0,
        }
    }

    /// Create a renderer that tries exactly the given tools.
    pub fn with_tools(timeout: Duration, tools: Vec<RenderTool>) -> Self {
        Self {
            tools: Some(tools),
            ..Self::new(timeout)
        }
    }

    fn workspace(&mut self) -> Result<&mut Workspace, DiagramError> {
        if self.workspace.is_none() {
            // An empty list is kept so PATH is scanned at most once.
            let tools = self.tools.get_or_insert_with(RenderTool::discover);
            if tools.is_empty() {
                return Err(DiagramError::ToolNotFound);
            }
            debug!(tools = ?tools.iter().map(RenderTool::name).collect::<Vec<_>>(), "mermaid renderers");
            let dir = tempfile::Builder::new().prefix("slidemark_").tempdir()?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let tools = self.tools.take().unwrap_or_default();
            self.workspace = Some(Workspace {
                dir,
                runtime,
                tools,
            });
        }
        // populated above
        self.workspace.as_mut().ok_or(DiagramError::ToolNotFound)
    }
}

impl DiagramRenderer for MermaidCli {
    fn render(&mut self, source: &str) -> Result<PathBuf, DiagramError> {
        let timeout = self.timeout;
        self.rendered += 1;
        let n = self.rendered;
        let ws = self.workspace()?;

        let input = ws.dir.path().join(format!("diagram-{n}.mmd"));
        let output = ws.dir.path().join(format!("diagram-{n}.png"));
        std::fs::write(&input, source)?;

        let mut last_error = DiagramError::ToolNotFound;
        for tool in &ws.tools {
            match run_tool(&ws.runtime, tool, &input, &output, timeout) {
                Ok(()) if has_content(&output) => {
                    info!(tool = %tool.name(), image = %output.display(), "rendered mermaid diagram");
                    return Ok(output);
                },
                Ok(()) => {
                    last_error = DiagramError::EmptyOutput { tool: tool.name() };
                },
                Err(e) => {
                    debug!(tool = %tool.name(), error = %e, "mermaid renderer failed");
                    last_error = e;
                },
            }
        }
        Err(last_error)
    }
}

fn has_content(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.len() > 0)
}

/// Run one tool to completion, killing it when the timeout expires.
fn run_tool(
    runtime: &Runtime,
    tool: &RenderTool,
    input: &Path,
    output: &Path,
    timeout: Duration,
) -> Result<(), DiagramError> {
    let name = tool.name();
    runtime.block_on(async {
        let mut child = Command::new(&tool.program)
            .args(&tool.leading_args)
            .arg("-i")
            .arg(input)
            .arg("-o")
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DiagramError::Spawn {
                tool: name.clone(),
                source,
            })?;

        // the child moves into the future so that dropping it on timeout kills the process
        let finished = tokio::time::timeout(timeout, async move {
            let mut stderr = Vec::new();
            if let Some(mut pipe) = child.stderr.take() {
                let _ = pipe.read_to_end(&mut stderr).await;
            }
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, stderr))
        })
        .await;

        match finished {
            Ok(Ok((status, _))) if status.success() => Ok(()),
            Ok(Ok((status, stderr))) => Err(DiagramError::Failed {
                tool: name.clone(),
                code: status.code(),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            }),
            Ok(Err(e)) => Err(DiagramError::Io(e)),
            Err(_) => Err(DiagramError::Timeout {
                tool: name.clone(),
                secs: timeout.as_secs(),
            }),
        }
    })
}
