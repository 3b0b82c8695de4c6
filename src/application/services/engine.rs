//! One round of twenty questions
//!
//! Walks the tree from the root following yes/no replies. A correct guess
//! ends the round; a wrong one teaches the tree a new question.

use tracing::{debug, info, instrument};

use crate::application::ApplicationResult;
use crate::domain::{DecisionTree, NodeId, Response};
use crate::infrastructure::traits::{LineSource, TextSink};

pub const GUESSED_IT: &str = "I guessed it!";
pub const ASK_ANSWER: &str = "What were you thinking of?";
pub const YES_OR_NO: &str = "please enter only 'yes' or 'no'";

/// How a round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The guess was confirmed; the tree is unchanged.
    Won { answer: String },
    /// The guess was wrong and the tree learned `question`.
    Learned { answer: String, question: String },
}

/// Position of the traversal cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Asking(NodeId),
    Guessing(NodeId),
}

impl State {
    fn at(tree: &DecisionTree, id: NodeId) -> Self {
        if tree.is_internal(id) {
            State::Asking(id)
        } else {
            State::Guessing(id)
        }
    }
}

/// Runs play sessions against a line source and a text sink.
pub struct DecisionEngine<'a> {
    input: &'a mut dyn LineSource,
    output: &'a mut dyn TextSink,
}

impl<'a> DecisionEngine<'a> {
    pub fn new(input: &'a mut dyn LineSource, output: &'a mut dyn TextSink) -> Self {
        Self { input, output }
    }

    /// Play one round: one root-to-leaf walk and at most one mutation.
    #[instrument(level = "debug", skip_all)]
    pub fn play(&mut self, tree: &mut DecisionTree) -> ApplicationResult<Outcome> {
        let mut state = State::at(tree, tree.root());
        loop {
            match state {
                State::Asking(id) => {
                    self.output.write_line(tree.content(id)?)?;
                    let reply = self.input.next_line()?;
                    match reply.parse::<Response>() {
                        Ok(Response::Yes) => state = State::at(tree, tree.yes_child(id)?),
                        Ok(Response::No) => state = State::at(tree, tree.no_child(id)?),
                        Err(e) => {
                            debug!("{}", e);
                            self.output.write_line(YES_OR_NO)?;
                        }
                    }
                }
                State::Guessing(id) => return self.guess(tree, id),
            }
        }
    }

    fn guess(&mut self, tree: &mut DecisionTree, leaf: NodeId) -> ApplicationResult<Outcome> {
        let guess = tree.content(leaf)?.to_string();
        self.output
            .write_line(&format!("You're thinking of a {}, right?", guess))?;

        if Response::confirms(&self.input.next_line()?) {
            self.output.write_line(GUESSED_IT)?;
            info!("guessed {:?}", guess);
            return Ok(Outcome::Won { answer: guess });
        }

        let answer = self.read_text(ASK_ANSWER)?;
        let question = self.read_text(&format!(
            "Enter a question that is 'yes' for {} and 'no' for {}",
            answer, guess
        ))?;
        tree.learn(leaf, &answer, &question)?;
        info!("learned {:?} from wrong guess {:?}", answer, guess);
        Ok(Outcome::Learned { answer, question })
    }

    /// Prompt until a non-blank line arrives; returns it trimmed.
    fn read_text(&mut self, prompt: &str) -> ApplicationResult<String> {
        loop {
            self.output.write_line(prompt)?;
            let line = self.input.next_line()?;
            let text = line.trim();
            if !text.is_empty() {
                return Ok(text.to_string());
            }
        }
    }
}
