//! 网模型：一次翻译过程独占的库所、迁移、弧与替换标签集合.
use std::fmt;

use crate::error::{Result, TranslateError};
use crate::net::ids::{PlaceId, TransitionId};
use crate::net::incidence::Incidence;
use crate::net::index_vec::IndexVec;
use crate::net::names::{NameOwner, NameTable};
use crate::net::structure::{
    InputArc, Marking, OutputArc, Place, PriorityArc, SubstitutionLabel, Transition, Weight,
};

#[derive(Clone, Default)]
pub struct NetModel {
    /// Net name from the `h` directive.
    pub name: Option<String>,
    pub names: NameTable,
    pub places: IndexVec<PlaceId, Place>,
    pub transitions: IndexVec<TransitionId, Transition>,
    pub input_arcs: Vec<InputArc>,
    pub output_arcs: Vec<OutputArc>,
    pub priority_arcs: Vec<PriorityArc>,
    pub labels: Vec<SubstitutionLabel>,
}

impl fmt::Debug for NetModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetModel")
            .field("name", &self.name)
            .field("places", &self.places)
            .field("transitions", &self.transitions)
            .field("input_arcs", &self.input_arcs)
            .field("output_arcs", &self.output_arcs)
            .field("priority_arcs", &self.priority_arcs)
            .field("labels", &self.labels)
            .finish()
    }
}

impl NetModel {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn add_place(&mut self, name: impl AsRef<[u8]>, tokens: i64) -> Result<PlaceId> {
        let place = PlaceId::new(self.places.len() as u32);
        let name = self.names.register(name.as_ref(), NameOwner::Place(place))?;
        self.places
            .try_push(Place::new(name, tokens))
            .map_err(TranslateError::exhausted("places"))
    }

    pub fn add_transition(&mut self, name: impl AsRef<[u8]>) -> Result<TransitionId> {
        let transition = TransitionId::new(self.transitions.len() as u32);
        let name = self
            .names
            .register(name.as_ref(), NameOwner::Transition(transition))?;
        self.transitions
            .try_push(Transition::new(name))
            .map_err(TranslateError::exhausted("transitions"))
    }

    pub fn set_tokens(&mut self, place: PlaceId, tokens: i64) {
        self.places[place].tokens = tokens;
    }

    pub fn add_input_arc(
        &mut self,
        place: PlaceId,
        transition: TransitionId,
        weight: Weight,
    ) -> Result<()> {
        push_arc(
            &mut self.input_arcs,
            InputArc::new(place, transition, weight),
            "p->t arcs",
        )
    }

    pub fn add_output_arc(
        &mut self,
        transition: TransitionId,
        place: PlaceId,
        weight: Weight,
    ) -> Result<()> {
        push_arc(
            &mut self.output_arcs,
            OutputArc::new(transition, place, weight),
            "t->p arcs",
        )
    }

    pub fn add_priority_arc(
        &mut self,
        dominant: TransitionId,
        dominated: TransitionId,
    ) -> Result<()> {
        push_arc(
            &mut self.priority_arcs,
            PriorityArc::new(dominant, dominated),
            "t->t arcs",
        )
    }

    pub fn attach_label(
        &mut self,
        transition: TransitionId,
        payload: impl AsRef<[u8]>,
    ) -> Result<()> {
        self.transitions[transition].labelled = true;
        push_arc(
            &mut self.labels,
            SubstitutionLabel {
                transition,
                payload: payload.as_ref().to_vec(),
            },
            "labels",
        )
    }

    pub fn place_name(&self, place: PlaceId) -> &[u8] {
        self.names.text_of(self.places[place].name)
    }

    pub fn transition_name(&self, transition: TransitionId) -> &[u8] {
        self.names.text_of(self.transitions[transition].name)
    }

    pub fn find_place(&self, name: impl AsRef<[u8]>) -> Option<PlaceId> {
        self.names.find_place(name.as_ref())
    }

    pub fn find_transition(&self, name: impl AsRef<[u8]>) -> Option<TransitionId> {
        self.names.find_transition(name.as_ref())
    }

    pub fn places_len(&self) -> usize {
        self.places.len()
    }

    pub fn transitions_len(&self) -> usize {
        self.transitions.len()
    }

    /// Total number of arcs of all three kinds.
    pub fn arcs_len(&self) -> usize {
        self.input_arcs.len() + self.output_arcs.len() + self.priority_arcs.len()
    }

    pub fn initial_marking(&self) -> Marking {
        Marking::new(IndexVec::from(
            self.places.iter().map(|p| p.tokens).collect::<Vec<_>>(),
        ))
    }

    /// `b[p][t]`: input arc weights, 0 where no arc exists. The last arc for a pair wins.
    pub fn input_matrix(&self) -> Incidence<Weight> {
        let mut matrix = Incidence::new(self.places_len(), self.transitions_len(), 0);
        for arc in &self.input_arcs {
            matrix.set(arc.place, arc.transition, arc.weight);
        }
        matrix
    }

    /// `d[p][t]`: output arc weights, stored literally.
    pub fn output_matrix(&self) -> Incidence<Weight> {
        let mut matrix = Incidence::new(self.places_len(), self.transitions_len(), 0);
        for arc in &self.output_arcs {
            matrix.set(arc.place, arc.transition, arc.weight);
        }
        matrix
    }

    pub fn log_summary(&self) {
        log::debug!(
            "net {:?}: {} places, {} transitions, {} p->t, {} t->p, {} t->t arcs, {} labels",
            self.name.as_deref().unwrap_or(""),
            self.places_len(),
            self.transitions_len(),
            self.input_arcs.len(),
            self.output_arcs.len(),
            self.priority_arcs.len(),
            self.labels.len()
        );
    }
}

fn push_arc<T>(arcs: &mut Vec<T>, arc: T, table: &'static str) -> Result<()> {
    arcs.try_reserve(1)
        .map_err(TranslateError::exhausted(table))?;
    arcs.push(arc);
    Ok(())
}
