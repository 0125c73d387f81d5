use crate::models::{Lister, Property};
use crate::session::Session;
use crate::visit::{CardAction, Modal, VisitWorkflow};
use std::fmt;

pub const QUOTA_EXHAUSTED_NOTICE: &str =
    "You have exhausted your free visits. Buy a subscription to continue.";

/// Text rendering of a listing card, its action area and any open modal
pub struct ListingCard<'a> {
    workflow: &'a VisitWorkflow,
    session: &'a Session,
    image: Option<&'a str>,
}

impl<'a> ListingCard<'a> {
    pub fn new(workflow: &'a VisitWorkflow, session: &'a Session) -> Self {
        Self {
            workflow,
            session,
            image: None,
        }
    }

    pub fn with_image(mut self, image: &'a str) -> Self {
        self.image = Some(image);
        self
    }
}

fn write_attributes(f: &mut fmt::Formatter<'_>, property: &Property) -> fmt::Result {
    writeln!(f, "{}", property.address)?;
    writeln!(f, "   City: {}", property.area.city.city_name)?;
    writeln!(f, "   Area: {}", property.area.area_name)?;
    writeln!(f, "   Carpet Area: {} sq. ft.", property.carpet_area)?;
    writeln!(f, "   Tenant Type: {}", property.tenant_type)?;
    writeln!(f, "   Flat Type: {}", property.flat_type)?;
    writeln!(f, "   Price: {}", property.price)
}

fn write_contact(f: &mut fmt::Formatter<'_>, owner: &Lister) -> fmt::Result {
    writeln!(f, "   Details")?;
    writeln!(f, "   Name: {}", owner.name)?;
    writeln!(f, "   Email: {}", owner.email)?;
    writeln!(f, "   Mobile Number: {}", owner.contact_number)
}

impl fmt::Display for ListingCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let property = self.workflow.property();
        write_attributes(f, property)?;
        if let Some(image) = self.image {
            writeln!(f, "   Image: {}", image)?;
        }

        match self.workflow.modal() {
            Some(Modal::Booking {
                visit_date,
                last_error,
            }) => {
                let shown = if visit_date.is_empty() {
                    "<not set>"
                } else {
                    visit_date.as_str()
                };
                writeln!(f, "   Select Visit Date: {}", shown)?;
                if let Some(error) = last_error {
                    writeln!(f, "   ! {}", error)?;
                }
                writeln!(f, "   [Schedule visit] [Close]")
            }
            Some(Modal::ViewingDetails) => {
                write_contact(f, &property.owner)?;
                writeln!(f, "   [Close]")
            }
            None => match self.workflow.primary_action(self.session) {
                CardAction::ScheduleVisit => writeln!(f, "   [Schedule visit]"),
                CardAction::ViewDetails => writeln!(f, "   [View Details]"),
                CardAction::QuotaExhausted => writeln!(f, "   {}", QUOTA_EXHAUSTED_NOTICE),
            },
        }
    }
}
